// Integration tests module

mod integration {
    mod commands_test;
    mod config_test;
    mod monitor_test;
}
