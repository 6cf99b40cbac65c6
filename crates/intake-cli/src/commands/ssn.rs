use intake_validation::transform::{format_ssn, mask_ssn_with};

pub fn format(value: &str) {
    println!("{}", format_ssn(value));
}

pub fn mask(value: &str, mask_char: char) {
    println!("{}", mask_ssn_with(&format_ssn(value), mask_char));
}
