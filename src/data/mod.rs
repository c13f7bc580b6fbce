pub mod board;
pub mod supabase;
pub mod types;
