mod reference;
mod result;

pub use self::reference::{value_ranges as print_value_ranges, weights as print_weights};
pub use self::result::{batch_summary as print_batch_summary, single as print_result};
