pub mod repository;

pub use repository::HdbRepository;
