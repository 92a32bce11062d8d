pub mod applications;
pub mod auth;
pub mod dashboard;
pub mod feedback;
pub mod jobs;
pub mod probes;
pub mod ui;
pub mod workhours;
