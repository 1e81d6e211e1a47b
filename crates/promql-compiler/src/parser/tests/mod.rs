mod errors;
mod grammar;
