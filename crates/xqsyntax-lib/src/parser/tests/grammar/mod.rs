mod constructors_tests;
mod control_tests;
mod expressions_tests;
mod flwor_tests;
mod module_tests;
mod types_tests;
