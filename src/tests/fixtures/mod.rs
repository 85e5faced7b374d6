pub mod app;

pub mod commands {
    pub mod start_time_entry;
}

pub mod events {
    pub mod payroll;
    pub mod work_log;
}

pub mod views;
