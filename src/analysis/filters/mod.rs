pub mod lowercase;
pub mod min_length;
