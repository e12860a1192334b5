pub mod cascade_delete;
