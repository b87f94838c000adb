pub mod answer;
pub mod catalog;
pub mod entity;
pub mod question;
pub mod serialization;
pub mod starter;
