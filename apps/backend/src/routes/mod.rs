pub mod auth;
pub mod backup;
pub mod chat;
pub mod evaluate;
pub mod grades;
pub mod learner;
pub mod progress;
