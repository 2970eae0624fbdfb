pub mod assessment;
pub mod resume;
pub mod roadmap;
pub mod role;
