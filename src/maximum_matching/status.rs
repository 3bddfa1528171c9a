#[derive(Default, PartialEq, Debug)]
pub enum Status {
    // before any solve; no solver returns it
    #[default]
    NotSolved,
    Maximal,
    Optimal,
}
