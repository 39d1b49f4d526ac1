use super::*;

#[test]
fn recording_sink_counts_each_event_kind_independently() {
    let mut log = RecordingEventLog::new();
    log.log_open_file(1);
    log.log_read_page(100);
    log.log_read_page(101);
    log.log_release_page(100);
    log.log_close_file(1);

    assert_eq!(log.count_open_file(), 1);
    assert_eq!(log.count_read_page(), 2);
    assert_eq!(log.count_release_page(), 1);
    assert_eq!(log.count_close_file(), 1);
}

#[test]
fn null_sink_drops_everything() {
    let mut log = NullEventLog;
    log.log_open_file(1);
    log.log_read_page(2);
    log.log_release_page(2);
    log.log_close_file(1);
    // nothing to assert: the point is that this compiles and doesn't panic.
}
