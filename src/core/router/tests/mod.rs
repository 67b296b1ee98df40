//! Router tests module


mod deadline_tests;
