//! The closed set of canonical format names, their aliases, and the named
//! groups they belong to.
//!
//! The registry is the *authority* on which formats have a working
//! decoder; this module is the authority on which *names* are legal at
//! all — a stable namespace covering every format worth recognizing,
//! whether or not this crate ships a decoder for it yet. Looking up a
//! legal-but-unimplemented name is a distinct bind error from looking up
//! a name outside the namespace entirely (see
//! [`crate::registry::Registry::get_by_format`]).

/// Every canonical format name in the closed namespace, in their original
/// enumeration order. Not every name here has a registered decoder in
/// [`crate::decoders`] — see module docs.
pub const CANONICAL_FORMATS: &[&str] = &[
    "pytest_json",
    "gotest_json",
    "gotest_text",
    "eslint_json",
    "pytest_text",
    "make_error",
    "generic_lint",
    "duckdb_test",
    "rubocop_json",
    "cargo_test_json",
    "swiftlint_json",
    "phpstan_json",
    "shellcheck_json",
    "stylelint_json",
    "clippy_json",
    "markdownlint_json",
    "yamllint_json",
    "bandit_json",
    "spotbugs_json",
    "ktlint_json",
    "hadolint_json",
    "lintr_json",
    "sqlfluff_json",
    "tflint_json",
    "kube_score_json",
    "cmake_build",
    "python_build",
    "node_build",
    "cargo_build",
    "maven_build",
    "gradle_build",
    "msbuild",
    "junit_text",
    "valgrind",
    "gdb_lldb",
    "rspec_text",
    "mocha_chai_text",
    "gtest_text",
    "nunit_xunit_text",
    "pylint_text",
    "flake8_text",
    "black_text",
    "mypy_text",
    "docker_build",
    "bazel_build",
    "isort_text",
    "bandit_text",
    "autopep8_text",
    "yapf_text",
    "coverage_text",
    "pytest_cov_text",
    "github_actions_text",
    "gitlab_ci_text",
    "jenkins_text",
    "drone_ci_text",
    "terraform_text",
    "ansible_text",
    "github_cli",
    "clang_tidy_text",
    "junit_xml",
    "nunit_xml",
    "checkstyle_xml",
    "jsonl",
    "logfmt",
    "syslog",
    "apache_access",
    "nginx_access",
    "aws_cloudtrail",
    "gcp_cloud_logging",
    "azure_activity",
    "python_logging",
    "log4j",
    "logrus",
    "iptables",
    "pf_firewall",
    "cisco_asa",
    "vpc_flow",
    "kubernetes",
    "windows_event",
    "auditd",
    "s3_access",
    "winston",
    "pino",
    "bunyan",
    "serilog",
    "nlog",
    "ruby_logger",
    "rails_log",
    "strace",
];

/// Stable group names. A group is a named subset of `CANONICAL_FORMATS`
/// sharing a domain.
pub const GROUPS: &[&str] = &[
    "python", "rust", "ci", "test", "java", "dotnet", "javascript", "go", "c_cpp", "ruby",
    "coverage",
];

pub fn is_canonical_format(name: &str) -> bool {
    CANONICAL_FORMATS.contains(&name)
}

pub fn is_group(name: &str) -> bool {
    GROUPS.contains(&name)
}

/// Members of each named group, by canonical format name. Only formats this
/// crate registers a decoder for are listed — a group lookup against the
/// registry naturally yields just the decoders available, which is the same
/// behavior group dispatch has always had for unimplemented members.
pub fn group_members(group: &str) -> &'static [&'static str] {
    match group {
        "python" => &[
            "pytest_json",
            "pytest_text",
            "pytest_cov_text",
            "mypy_text",
            "python_logging",
        ],
        "rust" => &["cargo_test_json", "clippy_json"],
        "go" => &["gotest_json", "gotest_text", "logrus"],
        "java" => &["junit_xml", "junit_text", "maven_build", "gradle_build", "log4j", "checkstyle_xml"],
        "dotnet" => &["nunit_xml", "nunit_xunit_text", "msbuild", "serilog", "nlog"],
        "javascript" => &["eslint_json", "mocha_chai_text", "node_build", "winston", "pino", "bunyan"],
        "c_cpp" => &["cmake_build", "gtest_text", "strace", "clang_tidy_text"],
        "ruby" => &["rspec_text", "ruby_logger", "rails_log"],
        "ci" => &[
            "bazel_build",
            "make_error",
            "github_actions_text",
            "gitlab_ci_text",
            "jenkins_text",
            "drone_ci_text",
            "terraform_text",
            "ansible_text",
            "github_cli",
        ],
        "test" => &[
            "pytest_json",
            "pytest_text",
            "gotest_json",
            "junit_xml",
            "junit_text",
            "nunit_xml",
            "nunit_xunit_text",
            "gtest_text",
            "rspec_text",
            "mocha_chai_text",
            "bazel_build",
        ],
        "coverage" => &["pytest_cov_text", "coverage_text"],
        _ => &[],
    }
}

/// Resolves an alias to its canonical name. Aliases are decoder-declared
/// (`ParserMetadata::aliases`); this function only knows the namespace-level
/// shorthand spellings a CLI user is likely to type (e.g. `junit` for
/// `junit_xml`).
pub fn resolve_builtin_alias(name: &str) -> Option<&'static str> {
    match name {
        "junit" => Some("junit_xml"),
        "nunit" => Some("nunit_xml"),
        "pytest" => Some("pytest_text"),
        "go" => Some("gotest_text"),
        "bazel" => Some("bazel_build"),
        "clippy" => Some("clippy_json"),
        "eslint" => Some("eslint_json"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strace_and_regexp_neighbors_are_present() {
        assert!(is_canonical_format("strace"));
        assert!(is_canonical_format("junit_xml"));
        assert!(is_canonical_format("jsonl"));
        assert!(!is_canonical_format("not_a_real_format"));
    }

    #[test]
    fn groups_are_stable() {
        for g in ["python", "rust", "ci", "test", "java", "dotnet", "javascript", "go", "c_cpp", "ruby", "coverage"] {
            assert!(is_group(g));
        }
        assert!(!is_group("not_a_group"));
    }

    #[test]
    fn group_members_are_canonical() {
        for g in GROUPS {
            for m in group_members(g) {
                assert!(is_canonical_format(m), "{m} in group {g} is not canonical");
            }
        }
    }
}
