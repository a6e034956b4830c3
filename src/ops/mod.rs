pub mod activation;
pub mod arithmetic;
pub mod comparison;
