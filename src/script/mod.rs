pub mod keywords;
pub mod matcher;
pub mod similarity;
