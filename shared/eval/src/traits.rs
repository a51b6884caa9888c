/// Anything addressed by its printed question number.
pub trait Numbered {
    fn question(&self) -> u32;
}

pub fn find_by_question<T: Numbered>(items: &[T], question: u32) -> Option<&T> {
    items.iter().find(|x| x.question() == question)
}
