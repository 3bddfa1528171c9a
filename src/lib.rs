pub mod maximum_matching;
