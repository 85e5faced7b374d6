#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartIdlePeriod {
    pub idle_id: String,
    pub employee_id: String,
    pub time_entry_id: Option<String>,
    pub start_time: Option<i64>,
    pub requested_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndIdlePeriod {
    pub idle_id: String,
    pub employee_id: String,
    pub end_time: Option<i64>,
    pub requested_at: i64,
}
