//! Flow mapping

pub mod mapper;

pub use mapper::FlowMapper;
