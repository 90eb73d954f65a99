/// Hands out parameter names `a`, `b`, ..., `z`, `aa`, `ab`, ...
///
/// One generator is shared by every predicate of a query so names never
/// collide when the predicates' bindings are merged.
#[derive(Debug, Default, Clone)]
pub struct ParameterNameGenerator {
    issued: usize,
}

impl ParameterNameGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> String {
        let name = Self::name_at(self.issued);
        self.issued += 1;
        name
    }

    /// Bijective base-26 spelling of `index`.
    fn name_at(mut index: usize) -> String {
        let mut letters = Vec::new();
        loop {
            letters.push(char::from(b'a' + (index % 26) as u8));
            if index < 26 {
                break;
            }
            index = index / 26 - 1;
        }
        letters.iter().rev().collect()
    }
}
