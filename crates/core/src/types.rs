/// Server-assigned ArchivesSpace record ids are integers.
pub type DbId = i64;
