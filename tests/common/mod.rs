//! Records shared by the integration tests.
//!
//! Field names mirror the wire names a Pascal-case schema would use, so the naming conventions have something to
//! convert.

#![allow(non_snake_case, dead_code)]

use vtag::Record;

#[derive(Debug, Default, Record)]
pub struct Base {
    #[tag(vtag = ",list,detail")]
    pub HelloWorld: String,
}

#[derive(Debug, Default, Record)]
pub struct Ext {
    #[tag(vtag = ",list")]
    pub DD: String,
}

#[derive(Debug, Default, Record)]
pub struct Student {
    #[tag(embed)]
    pub Base: Option<Box<Base>>,
    #[tag(vtag = ",list")]
    pub Ext: Ext,
    #[tag(vtag = "name,list,detail")]
    pub Name: String,
    #[tag(vtag = "age,list,detail")]
    pub Age: String,
}
