pub mod dashboard;
pub mod departments;
pub mod placeholder;
pub mod subjects;
pub mod users;
