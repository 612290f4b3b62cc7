use taskteller_core::{resolve_time, ClockTime};

fn hm(hour: u32, minute: u32) -> Option<ClockTime> {
    ClockTime::new(hour, minute)
}

#[test]
fn meridiem_hour_is_converted_to_24_hour_time() {
    assert_eq!(resolve_time("4 PM"), hm(16, 0));
    assert_eq!(resolve_time("4pm"), hm(16, 0));
    assert_eq!(resolve_time("at 7 pm"), hm(19, 0));
    assert_eq!(resolve_time("9 AM"), hm(9, 0));
}

#[test]
fn twelve_oclock_edges_follow_meridiem() {
    assert_eq!(resolve_time("12 AM"), hm(0, 0));
    assert_eq!(resolve_time("12 pm"), hm(12, 0));
    assert_eq!(resolve_time("12:30 am"), hm(0, 30));
}

#[test]
fn clock_form_keeps_minutes() {
    assert_eq!(resolve_time("4:30 pm"), hm(16, 30));
    assert_eq!(resolve_time("4:30PM"), hm(16, 30));
    assert_eq!(resolve_time("16:00"), hm(16, 0));
    assert_eq!(resolve_time(" 09:05 "), hm(9, 5));
}

#[test]
fn bare_number_is_an_hour() {
    assert_eq!(resolve_time("9"), hm(9, 0));
    assert_eq!(resolve_time("18"), hm(18, 0));
}

#[test]
fn out_of_range_values_do_not_resolve() {
    assert_eq!(resolve_time("25"), None);
    assert_eq!(resolve_time("10:75"), None);
    assert_eq!(resolve_time("23:60"), None);
}

#[test]
fn phrases_without_numbers_do_not_resolve() {
    assert_eq!(resolve_time("noon"), None);
    assert_eq!(resolve_time("in the evening"), None);
    assert_eq!(resolve_time(""), None);
}

#[test]
fn clock_time_rejects_invalid_components() {
    assert!(ClockTime::new(24, 0).is_none());
    assert!(ClockTime::new(0, 60).is_none());

    let time = ClockTime::new(23, 59).unwrap();
    assert_eq!((time.hour(), time.minute()), (23, 59));
}
