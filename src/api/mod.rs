pub mod petitioner;
