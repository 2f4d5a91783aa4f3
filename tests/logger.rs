use usher::logger::Logger;

#[test]
fn test_disabled_logger_skips_the_file_sink() {
    let logger = Logger::from_config(false).unwrap();
    assert!(!logger.is_enabled());
    assert!(!logger.has_file_writer());
    assert!(logger.file_writer().is_none());
}

#[test]
fn test_log_entries_come_back_newest_first() {
    let logger = Logger::new();
    logger.log("first entry".to_string());
    logger.log("second entry".to_string());

    let logs = logger.get_logs();
    assert_eq!(logs.len(), 2);
    assert!(logs[0].contains("second entry"));
    assert!(logs[1].contains("first entry"));
}

#[test]
fn test_log_entries_carry_a_timestamp_prefix() {
    let logger = Logger::new();
    logger.log("timed".to_string());

    let logs = logger.get_logs();
    assert!(logs[0].starts_with('['));
    assert!(logs[0].ends_with("] timed"));
}

#[test]
fn test_clear_empties_the_buffer() {
    let logger = Logger::new();
    logger.log("ephemeral".to_string());
    assert_eq!(logger.get_logs().len(), 1);

    logger.clear();
    assert!(logger.get_logs().is_empty());
}

#[test]
fn test_clones_share_one_buffer() {
    let logger = Logger::new();
    let clone = logger.clone();

    clone.log("from the clone".to_string());
    assert_eq!(logger.get_logs().len(), 1);
    assert!(logger.get_logs()[0].contains("from the clone"));
}

#[test]
fn test_log_file_path_lands_under_the_app_directory() {
    let path = Logger::get_log_file_path().unwrap();
    assert!(path.ends_with("usher/usher.log"));
}
