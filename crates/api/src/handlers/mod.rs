pub mod revise_master_deadline;
pub mod revise_self_deadline;
pub mod task;
