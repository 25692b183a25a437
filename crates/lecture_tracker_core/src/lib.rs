pub mod catalog;
pub mod domain;
pub mod ports;
pub mod summary;

pub use domain::{Lecture, LectureDocument, LectureUpdate};
pub use ports::{LectureStore, PortError, PortResult, SummaryProvider};
