use chrono::{NaiveDate, TimeZone, Utc};
use ofxview_ingest::{ParseEnv, parse_ofx_with};
use ofxview_report::{
    AccountSummary, StatementResponse, TransactionFilter, TypeFilter, format_currency,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

const STATEMENT: &str = "<OFX>\n\
<BANKACCTFROM><ACCTID>1234<ACCTTYPE>CHECKING</BANKACCTFROM>\n\
<STMTTRN><DTPOSTED>20240115<TRNAMT>-50.00<FITID>T1<NAME>Coffee</STMTTRN>\n\
<STMTTRN><DTPOSTED>20240201<TRNAMT>2500.00<FITID>T2<NAME>Salary<MEMO>ACME payroll</STMTTRN>\n\
<STMTTRN><DTPOSTED>20240120<TRNAMT>-700.00<FITID>T3<MEMO>Rent January</STMTTRN>\n\
</OFX>\n";

fn parse() -> ofxview_ingest::ParsedStatement {
    let mut env = ParseEnv::new(
        NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
        StdRng::seed_from_u64(5),
    );
    parse_ofx_with(STATEMENT, &mut env).unwrap()
}

#[test]
fn test_summary_from_parsed_statement() {
    let stmt = parse();
    let s = AccountSummary::from_transactions(&stmt.accounts[0].transactions);
    assert_eq!(s.total_transactions, 3);
    assert_eq!(s.total_credits, 2500.0);
    assert_eq!(s.total_debits, 750.0);
    assert_eq!(s.net_amount, 1750.0);
    assert_eq!(s.oldest, NaiveDate::from_ymd_opt(2024, 1, 15));
    assert_eq!(s.newest, NaiveDate::from_ymd_opt(2024, 2, 1));
    assert_eq!(format_currency(s.net_amount, "en-US"), "$1,750.00");
}

#[test]
fn test_filter_debits_by_memo() {
    let stmt = parse();
    let f = TransactionFilter::new(TypeFilter::Debit, Some("rent".to_string()));
    let hits = f.apply(&stmt.accounts[0].transactions);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "T3");
}

#[test]
fn test_response_payload_shape() {
    let stmt = parse();
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
    let resp = StatementResponse::from_statement(&stmt, "pt-BR", at);
    let json = serde_json::to_value(&resp).unwrap();

    assert_eq!(json["locale"], "pt-BR");
    assert_eq!(json["meta"]["totalTransactions"], 3);
    assert_eq!(json["meta"]["processingTimestamp"], "2024-03-01T12:30:00.000Z");

    let acct = &json["accounts"][0];
    assert_eq!(acct["accountId"], "1234");
    assert_eq!(acct["accountType"], "CHECKING");
    assert_eq!(acct["bankId"], "N/A");

    let first = &acct["transactions"][0];
    assert_eq!(first["id"], "T2");
    assert_eq!(first["date"], "2024-02-01T00:00:00.000Z");
    assert_eq!(first["type"], "CREDIT");
    assert_eq!(first["memo"], "ACME payroll");

    let coffee = &acct["transactions"][2];
    assert_eq!(coffee["memo"], "");
    assert_eq!(coffee["amount"], -50.0);
}

#[test]
fn test_response_without_accounts() {
    let mut env = ParseEnv::new(
        NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
        StdRng::seed_from_u64(5),
    );
    let stmt = parse_ofx_with("<OFX></OFX>", &mut env).unwrap();
    let resp = StatementResponse::from_statement(&stmt, "en-US", Utc::now());
    assert!(resp.accounts.is_empty());
    assert_eq!(resp.meta.total_transactions, 0);
}
