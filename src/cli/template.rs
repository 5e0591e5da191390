//! Template CLI command

use crate::parser::render_blank_template;

pub fn run() {
    print!("{}", render_blank_template());
}
