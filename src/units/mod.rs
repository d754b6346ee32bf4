//! 유량 표시 단위와 환산.

pub mod flow;

pub use flow::{convert_flow, FlowQuantity, ResultUnit, TimeUnit, UnitParseError};
