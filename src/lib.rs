pub mod shared {
    pub mod core {
        pub mod decision;
        pub mod errors;
        pub mod primitives;
        pub mod reference_data;
    }
    pub mod application {
        pub mod command_handler;
        pub mod errors;
        pub mod projector;
    }
    pub mod infrastructure {
        pub mod event_store;
        pub mod intent_outbox;
        pub mod reference_data;
    }
}

pub mod modules {
    pub mod approval {
        pub mod core {
            pub mod workflow;
        }
    }

    pub mod time_tracking {
        pub mod core {
            pub mod events;
            pub mod evolve;
            pub mod intents;
            pub mod projections;
            pub mod state;
        }
        pub mod use_cases {
            pub mod time_entry_lifecycle {
                pub mod command;
                pub mod decide;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod idle_periods {
                pub mod command;
                pub mod decide;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod timesheets {
                pub mod command;
                pub mod decide;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod list_work_log {
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
                pub mod projection;
                pub mod queries_port;
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod intent_outbox;
                pub mod projections;
                pub mod projections_in_memory;
            }
        }
        pub mod application {
            pub mod work_log_service;
        }
    }

    pub mod payroll {
        pub mod core {
            pub mod calculation;
            pub mod events;
            pub mod evolve;
            pub mod state;
        }
        pub mod use_cases {
            pub mod calculate_payroll {
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod create_payroll {
                pub mod command;
                pub mod decide;
            }
            pub mod process_payroll {
                pub mod command;
                pub mod decide;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod list_payroll {
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
                pub mod projection;
                pub mod queries_port;
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod projections;
                pub mod projections_in_memory;
            }
        }
        pub mod application {
            pub mod payroll_calculator;
            pub mod payroll_service;
        }
    }
}

pub mod shell;
