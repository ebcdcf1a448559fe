//! OFX 1.x bank statement parser.
//!
//! Tolerant of messy bank exports: the only fatal condition is a missing
//! `<OFX>` root. Everything else (account type, bank id, transaction id, date,
//! amount, description) falls back to a default.
//!
//! Expected input (SGML flavour, leaf tags usually unclosed):
//!   <OFX>
//!     <BANKACCTFROM><BANKID>0341<ACCTID>1234<ACCTTYPE>CHECKING</BANKACCTFROM>
//!     <STMTTRN><TRNTYPE>DEBIT<DTPOSTED>20240115<TRNAMT>-50.00<FITID>T1<NAME>Coffee</STMTTRN>
//!   </OFX>

use std::sync::LazyLock;

use chrono::{Local, NaiveDate};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::error::{IngestError, Result};
use crate::fields::SegmentFields;
use crate::scan::{Segmenter, TagRule, contains_tag};
use crate::types::{
    Account, Institution, ParsedStatement, SignOnInfo, Transaction, TransactionType,
    UNKNOWN_ACCOUNT_TYPE, UNKNOWN_DESCRIPTION,
};

const ROOT_TAG: &str = "OFX";
const FALLBACK_ID_PREFIX: &str = "txn-";
const FALLBACK_ID_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

struct HeaderRules {
    account_id: TagRule,
    account_type: TagRule,
    bank_id: TagRule,
    dt_server: TagRule,
    language: TagRule,
    org: TagRule,
    fid: TagRule,
}

static HEADER: LazyLock<HeaderRules> = LazyLock::new(|| HeaderRules {
    account_id: TagRule::new("ACCTID"),
    account_type: TagRule::new("ACCTTYPE"),
    bank_id: TagRule::new("BANKID"),
    dt_server: TagRule::new("DTSERVER"),
    language: TagRule::new("LANGUAGE"),
    org: TagRule::new("ORG"),
    fid: TagRule::new("FID"),
});

static TRANSACTIONS: LazyLock<Segmenter> = LazyLock::new(|| Segmenter::new("STMTTRN"));
static SIGN_ON: LazyLock<Segmenter> = LazyLock::new(|| Segmenter::new("SONRS"));
static INSTITUTION: LazyLock<Segmenter> = LazyLock::new(|| Segmenter::new("FI"));

/// Sources for the two fallbacks that are not a pure function of the input:
/// the date used when DTPOSTED is missing or short, and the RNG behind synthesized ids.
#[derive(Debug, Clone)]
pub struct ParseEnv<R> {
    pub today: NaiveDate,
    pub rng: R,
}

impl<R: Rng> ParseEnv<R> {
    pub fn new(today: NaiveDate, rng: R) -> Self {
        Self { today, rng }
    }
}

impl ParseEnv<SmallRng> {
    /// Local calendar date and an entropy-seeded fast RNG.
    pub fn now() -> Self {
        Self {
            today: Local::now().date_naive(),
            rng: SmallRng::from_entropy(),
        }
    }
}

/// True when the content has an `<OFX>` root tag in any letter case.
pub fn is_ofx(content: &str) -> bool {
    contains_tag(content, ROOT_TAG)
}

/// Parse OFX text using the wall clock and an entropy-seeded RNG for fallbacks.
pub fn parse_ofx(content: &str) -> Result<ParsedStatement> {
    parse_ofx_with(content, &mut ParseEnv::now())
}

/// Parse OFX text with caller-supplied fallback sources.
pub fn parse_ofx_with<R: Rng>(content: &str, env: &mut ParseEnv<R>) -> Result<ParsedStatement> {
    if !is_ofx(content) {
        return Err(IngestError::Format("missing <OFX> root tag".to_string()));
    }

    let sign_on = parse_sign_on(content);

    let accounts = match parse_account_header(content) {
        Some(account) => vec![attach_transactions(account, content, env)],
        None => {
            tracing::debug!("no <ACCTID> found, statement has no accounts");
            Vec::new()
        }
    };

    Ok(ParsedStatement { sign_on, accounts })
}

/// First ACCTID/ACCTTYPE in the file, plus the first BANKID anywhere in it.
/// Later account blocks are ignored.
fn parse_account_header(content: &str) -> Option<Account> {
    let account_id = HEADER.account_id.first(content)?;
    let count = HEADER.account_id.all(content).len();
    if count > 1 {
        tracing::debug!(count, "multiple <ACCTID> tags, keeping the first: {account_id}");
    }

    let account_type = HEADER
        .account_type
        .first(content)
        .unwrap_or(UNKNOWN_ACCOUNT_TYPE);

    let mut account = Account::new(account_id, account_type);
    account.bank_id = HEADER.bank_id.first(content).map(str::to_string);
    Some(account)
}

fn attach_transactions<R: Rng>(
    mut account: Account,
    content: &str,
    env: &mut ParseEnv<R>,
) -> Account {
    account.transactions = TRANSACTIONS
        .segments(content)
        .map(|segment| parse_transaction(segment, env))
        .collect();

    // Vec::sort_by is stable, so equal dates keep document order.
    account.transactions.sort_by(|a, b| b.date.cmp(&a.date));
    account
}

fn parse_transaction<R: Rng>(segment: &str, env: &mut ParseEnv<R>) -> Transaction {
    let fields = SegmentFields::extract(segment);

    let id = match fields.id {
        Some(id) => id.to_string(),
        None => fallback_id(&mut env.rng),
    };

    let date = match fields.posted {
        Some(raw) => parse_ofx_date(raw).unwrap_or_else(|| {
            tracing::debug!(%id, raw, "unreadable <DTPOSTED>, using {}", env.today);
            env.today
        }),
        None => env.today,
    };

    let (amount, kind) = match fields.amount {
        Some(raw) => {
            let amount = parse_amount(raw).unwrap_or_else(|| {
                tracing::warn!(%id, raw, "non-numeric <TRNAMT>, treating as 0");
                0.0
            });
            (amount, TransactionType::from_amount(amount))
        }
        None => (0.0, TransactionType::default()),
    };

    let mut description = fields.name.unwrap_or(UNKNOWN_DESCRIPTION);
    if description == UNKNOWN_DESCRIPTION {
        if let Some(memo) = fields.memo {
            description = memo;
        }
    }

    Transaction {
        id,
        date,
        amount,
        kind,
        description: description.to_string(),
        memo: fields.memo.map(str::to_string),
    }
}

fn parse_sign_on(content: &str) -> Option<SignOnInfo> {
    let block = SIGN_ON.segments(content).next()?;
    let institution = INSTITUTION.segments(block).next().map(|fi| Institution {
        name: HEADER.org.first(fi).map(str::to_string),
        id: HEADER.fid.first(fi).map(str::to_string),
    });

    Some(SignOnInfo {
        dt_server: HEADER.dt_server.first(block).map(str::to_string),
        language: HEADER.language.first(block).map(str::to_string),
        institution,
    })
}

/// `txn-` plus nine base-36 characters. Not guaranteed unique.
pub fn fallback_id<R: Rng>(rng: &mut R) -> String {
    let mut id = String::with_capacity(FALLBACK_ID_PREFIX.len() + FALLBACK_ID_LEN);
    id.push_str(FALLBACK_ID_PREFIX);
    for _ in 0..FALLBACK_ID_LEN {
        id.push(BASE36[rng.gen_range(0..BASE36.len())] as char);
    }
    id
}

/// OFX datetime (`YYYYMMDD[HHMMSS[.XXX]][[gmt offset:tz]]`) to a calendar date.
/// Only the leading eight characters are read; time and zone are dropped.
pub fn parse_ofx_date(raw: &str) -> Option<NaiveDate> {
    let ymd = raw.trim().get(..8)?;
    if !ymd.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = ymd[0..4].parse().ok()?;
    let month: u32 = ymd[4..6].parse().ok()?;
    let day: u32 = ymd[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Signed decimal amount. OFX allows `,` as the decimal separator (`-12,50`), and
/// some exports add thousands grouping (`1.234,56`, `1,234.56`).
/// `None` for anything that is not a finite number.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let normalized = match (raw.rfind(','), raw.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => raw.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => raw.replace(',', ""),
        (Some(_), None) if raw.matches(',').count() == 1 => raw.replace(',', "."),
        _ => raw.to_string(),
    };
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}
