mod request_log;

pub use request_log::log_mutations;
