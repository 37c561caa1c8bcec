use crate::domain::model::EmailAddress;

pub const MAX_CANDIDATES: usize = 5;

/// 由 email local part 推導可能的 username，保留出現順序、去重、最多 5 個
///
/// 規則依序為：原樣、去掉 `.`、只留 ASCII 字母、前兩段相接、第一段加第二段首字。
/// 沒有第二段時略過後兩條規則。
pub fn generate_candidates(email: &EmailAddress) -> Vec<String> {
    let local = email.local_part();
    let mut tokens = local.split('.');
    let first = tokens.next().unwrap_or_default();
    let second = tokens.next();

    let mut patterns = vec![
        local.to_string(),
        local.replace('.', ""),
        local.chars().filter(|c| c.is_ascii_alphabetic()).collect(),
    ];

    if let Some(second) = second {
        patterns.push(format!("{}{}", first, second));
        if let Some(initial) = second.chars().next() {
            patterns.push(format!("{}{}", first, initial));
        }
    }

    let mut candidates: Vec<String> = Vec::with_capacity(MAX_CANDIDATES);
    for pattern in patterns {
        if pattern.is_empty() || candidates.contains(&pattern) {
            continue;
        }
        candidates.push(pattern);
    }
    candidates.truncate(MAX_CANDIDATES);

    tracing::trace!("Generated {} candidates for {}: {:?}", candidates.len(), email, candidates);
    candidates
}
