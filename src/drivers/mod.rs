pub mod skylanders;
