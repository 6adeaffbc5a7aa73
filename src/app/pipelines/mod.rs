pub mod print_pipeline;
