mod detail_tests;
mod listings_tests;
