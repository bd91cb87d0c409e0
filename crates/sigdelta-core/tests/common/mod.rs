use sigdelta_core::{diff, DeltaChain, Signature, SignatureTable, Version, VersionTransition};

/// Build a signature from persisted `(key, type)` entries
///
/// Key `0` is the return slot; a trailing `=` marks an optional parameter.
#[allow(dead_code)]
pub fn sig(entries: &[(&str, &str)]) -> Signature {
    Signature::from_entries(entries.iter().copied()).unwrap()
}

/// Build a table from `(routine, signature)` pairs
#[allow(dead_code)]
pub fn table(routines: Vec<(&str, Signature)>) -> SignatureTable {
    routines.into_iter().collect()
}

#[allow(dead_code)]
pub fn v(major: u16, minor: u16) -> Version {
    Version::new(major, minor)
}

#[allow(dead_code)]
pub fn t(from: Version, to: Version) -> VersionTransition {
    VersionTransition::new(from, to).unwrap()
}

/// Chain built by diffing each adjacent pair of `(version, table)` snapshots
#[allow(dead_code)]
pub fn chain_from_snapshots(snapshots: &[(Version, SignatureTable)]) -> DeltaChain {
    let mut chain = DeltaChain::new();
    for pair in snapshots.windows(2) {
        let (older_version, older) = &pair[0];
        let (newer_version, newer) = &pair[1];
        chain
            .append(t(*older_version, *newer_version), diff(older, newer))
            .unwrap();
    }
    chain
}

/// `openssl_csr_sign` as of 8.3
#[allow(dead_code)]
pub fn openssl_csr_sign_83() -> Signature {
    sig(&[
        ("0", "OpenSSLCertificate|false"),
        ("csr", "OpenSSLCertificateSigningRequest|string"),
        ("ca_certificate", "OpenSSLCertificate|string|null"),
        ("private_key", "#[\\SensitiveParameter] OpenSSLAsymmetricKey|OpenSSLCertificate|array|string"),
        ("days", "int"),
        ("options=", "?array"),
        ("serial=", "int"),
    ])
}

/// `openssl_csr_sign` as of 8.4, which gained `serial_hex=`
#[allow(dead_code)]
pub fn openssl_csr_sign_84() -> Signature {
    sig(&[
        ("0", "OpenSSLCertificate|false"),
        ("csr", "OpenSSLCertificateSigningRequest|string"),
        ("ca_certificate", "OpenSSLCertificate|string|null"),
        ("private_key", "#[\\SensitiveParameter] OpenSSLAsymmetricKey|OpenSSLCertificate|array|string"),
        ("days", "int"),
        ("options=", "?array"),
        ("serial=", "int"),
        ("serial_hex=", "?string"),
    ])
}

/// Three versions of a small function table with every kind of change
///
/// - 8.2 -> 8.3: `str_contains` added, `each` removed, `strlen` unchanged
/// - 8.3 -> 8.4: `openssl_csr_sign` gains `serial_hex=`, `array_find` added
#[allow(dead_code)]
pub fn php_snapshots() -> Vec<(Version, SignatureTable)> {
    let strlen = sig(&[("0", "int"), ("string", "string")]);
    let each = sig(&[("0", "array|false"), ("array", "array")]);
    let str_contains = sig(&[("0", "bool"), ("haystack", "string"), ("needle", "string")]);
    let array_find = sig(&[("0", "mixed"), ("array", "array"), ("callback", "callable")]);

    vec![
        (
            v(8, 2),
            table(vec![
                ("strlen", strlen.clone()),
                ("each", each),
                ("openssl_csr_sign", openssl_csr_sign_83()),
            ]),
        ),
        (
            v(8, 3),
            table(vec![
                ("strlen", strlen.clone()),
                ("str_contains", str_contains.clone()),
                ("openssl_csr_sign", openssl_csr_sign_83()),
            ]),
        ),
        (
            v(8, 4),
            table(vec![
                ("strlen", strlen),
                ("str_contains", str_contains),
                ("openssl_csr_sign", openssl_csr_sign_84()),
                ("array_find", array_find),
            ]),
        ),
    ]
}
