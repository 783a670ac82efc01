pub mod workflow;

pub use workflow::execute_feed_workflow;
