/// Cross-module test suites
///
/// Test Organization:
/// - ntru_tests: key generation, encryption and decryption end to end,
///   ring-level algebraic properties
/// - reduction_tests: Gauss and LLL reduction checked against the
///   equivalence oracle
