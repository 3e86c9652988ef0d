use schemars::schema::RootSchema;
use schemars::schema_for;

use crate::tiddler::Tiddler;

/// JSON Schema for the generated import file (an array of tiddlers).
pub fn tiddlers_json_schema() -> RootSchema {
    schema_for!(Vec<Tiddler>)
}
