pub mod examples;
pub mod run;
pub mod setup;
