mod basex_tests;
mod full_text_tests;
mod marklogic_tests;
mod saxon_tests;
mod scripting_tests;
mod update_tests;
