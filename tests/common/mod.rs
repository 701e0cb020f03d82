#![allow(dead_code)]

use std::rc::Rc;

/// Person compared by value
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
}

impl Person {
    pub fn new(last_name: &str, first_name: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        }
    }
}

/// Person compared by identity: two handles are equal only if they share one allocation
#[derive(Clone, Debug)]
pub struct PersonRef(pub Rc<Person>);

impl PersonRef {
    pub fn new(last_name: &str, first_name: &str) -> Self {
        Self(Rc::new(Person::new(last_name, first_name)))
    }
}

impl PartialEq for PersonRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
