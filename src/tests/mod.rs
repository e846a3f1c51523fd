#[cfg(test)]
pub mod common;

pub mod financial_statements_flow;
