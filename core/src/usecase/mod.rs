pub mod month_overview;
