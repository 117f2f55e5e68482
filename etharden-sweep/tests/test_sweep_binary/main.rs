#[path = "../common/mod.rs"]
mod common;

mod test_failure;
mod test_list;
mod test_run;
