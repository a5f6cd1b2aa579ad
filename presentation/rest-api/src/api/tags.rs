use poem_openapi::Tags;

#[derive(Debug, Tags)]
pub enum ApiTags {
    Health,
    Receipts,
    ExpenseForms,
    ScanSessions,
}
