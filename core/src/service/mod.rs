pub mod day_editor;
