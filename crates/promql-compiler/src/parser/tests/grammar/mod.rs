mod aggregates_tests;
mod calls_tests;
mod expressions_tests;
mod selectors_tests;
mod series_tests;
mod statements_tests;
