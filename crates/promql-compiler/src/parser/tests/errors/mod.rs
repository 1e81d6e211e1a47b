mod syntax_tests;
mod trailing_tests;
