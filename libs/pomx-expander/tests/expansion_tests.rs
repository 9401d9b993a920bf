use std::fs;
use std::path::PathBuf;

use pomx_expander::{locate_project, Error, Pass, PassContext, ProjectObjectModel};
use pomx_repository::{CoordinateError, LocalRepository, ResolveError};
use pomx_xml::{Document, XmlError};
use pretty_assertions::assert_eq;

const HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project>
    <!-- WARNING: Do Not Modify This File! -->
    <!-- Generated from inline -->
    <modelVersion>4.0.0</modelVersion>
"#;

const DUMMY_GAV: &str = "    <groupId>dummy-group</groupId>
    <artifactId>dummy-artifact</artifactId>
    <version>1.2.3-SNAPSHOT</version>
    <packaging>jar</packaging>
";

const APACHE_LICENSE: &str = "        <license>
            <name>Apache License 2.0</name>
            <url>https://www.apache.org/licenses/LICENSE-2.0</url>
        </license>
";

fn data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

fn repository() -> LocalRepository {
    LocalRepository::new(data("repository"))
}

fn expand(xml: &str) -> String {
    let repository = repository();
    ProjectObjectModel::parse(xml, &repository)
        .unwrap()
        .to_xml_string()
        .unwrap()
}

fn expand_err(xml: &str) -> Error {
    let repository = repository();
    ProjectObjectModel::parse(xml, &repository)
        .unwrap()
        .into_expanded()
        .unwrap_err()
}

fn with_profiles(body: &str) -> String {
    format!(
        "<project>\n    <jar>dummy-group:dummy-artifact:1.2.3-SNAPSHOT</jar>\n{body}</project>"
    )
}

/// A generated profile for `dummy-group:{artifact_id}:1.0`.
fn profile(artifact_id: &str, sections: &str) -> String {
    format!(
        "        <profile>
            <id>dummy-group:{artifact_id}</id>
            <activation>
                <property>
                    <name>user.dir</name>
                </property>
            </activation>
{sections}            <properties>
                <dummy-group.{artifact_id}.version>1.0</dummy-group.{artifact_id}.version>
            </properties>
        </profile>
"
    )
}

#[test]
fn expands_complete_descriptor_file() {
    let repository = repository();
    let mut pom = ProjectObjectModel::read_from(&data("pomx.xml"), &repository).unwrap();

    let expected = fs::read_to_string(data("pom.xml")).unwrap();
    assert_eq!(pom.to_xml_string().unwrap(), expected);
}

#[test]
fn plain_document_only_gains_header() {
    let output = expand("<project>\n    <name>plain</name>\n</project>");
    assert_eq!(output, format!("{HEADER}    <name>plain</name>\n</project>\n"));
}

#[test]
fn packaging_shorthand() {
    let output = expand("<project><jar>dummy-group:dummy-artifact:1.2.3-SNAPSHOT</jar></project>");
    assert_eq!(output, format!("{HEADER}{DUMMY_GAV}</project>\n"));
}

#[test]
fn multiple_packagings_fail() {
    let err = expand_err("<project><jar>g:a:1</jar><war>g:a:1</war></project>");
    assert!(err.to_string().contains("multiple packagings found"));
}

#[test]
fn malformed_project_coordinates() {
    let err = expand_err("<project><jar>dummy-group</jar></project>");
    assert_eq!(
        err.to_string(),
        "too few elements 1 in GAV expression: 'dummy-group'"
    );

    let err = expand_err(
        "<project><jar>dummy-group:dummy-artifact:mac-os:1.2.3-SNAPSHOT:too-much</jar></project>",
    );
    assert_eq!(
        err.to_string(),
        "too many elements 5 in GAV expression: 'dummy-group:dummy-artifact:mac-os:1.2.3-SNAPSHOT:too-much'"
    );
}

#[test]
fn profile_with_license() {
    let output = expand(&with_profiles(
        "    <profile>dummy-group:profile-with-license:1.0</profile>\n",
    ));

    assert_eq!(
        output,
        format!(
            "{HEADER}{DUMMY_GAV}    <licenses>\n{APACHE_LICENSE}    </licenses>\n\n    <profiles>\n{}    </profiles>\n</project>\n",
            profile("profile-with-license", "")
        )
    );
}

#[test]
fn profile_license_joins_existing_licenses() {
    let output = expand(&with_profiles(
        "    <licenses>
        <license>
            <name>Proprietary</name>
        </license>
    </licenses>
    <profile>dummy-group:profile-with-license:1.0</profile>
",
    ));

    assert_eq!(
        output,
        format!(
            "{HEADER}{DUMMY_GAV}    <licenses>
        <license>
            <name>Proprietary</name>
        </license>
{APACHE_LICENSE}    </licenses>

    <profiles>
{}    </profiles>
</project>
",
            profile("profile-with-license", "")
        )
    );
}

#[test]
fn two_profiles_share_project_sections() {
    let output = expand(&with_profiles(
        "    <profile>dummy-group:profile-with-license:1.0</profile>
    <profile>dummy-group:profile-with-mit-license:1.0</profile>
",
    ));

    assert_eq!(
        output,
        format!(
            "{HEADER}{DUMMY_GAV}    <licenses>
{APACHE_LICENSE}        <license>
            <name>MIT License</name>
        </license>
    </licenses>
    <repositories>
        <repository>
            <id>central</id>
            <url>https://repo.maven.apache.org/maven2</url>
        </repository>
    </repositories>

    <profiles>
{}{}    </profiles>
</project>
",
            profile("profile-with-license", ""),
            profile("profile-with-mit-license", "")
        )
    );
}

#[test]
fn profile_sections_are_expanded_before_merging() {
    let output = expand(&with_profiles(
        "    <profile>dummy-group:profile-with-build:1.0</profile>\n",
    ));

    let sections = "            <build>
                <plugins>
                    <plugin>
                        <groupId>org.apache.maven.plugins</groupId>
                        <artifactId>maven-compiler-plugin</artifactId>
                        <version>3.6.1</version>
                        <configuration>
                            <source>1.8</source>
                        </configuration>
                    </plugin>
                </plugins>
            </build>
            <dependencies>
                <dependency>
                    <groupId>junit</groupId>
                    <artifactId>junit</artifactId>
                    <version>4.12</version>
                    <scope>test</scope>
                </dependency>
            </dependencies>
";
    assert_eq!(
        output,
        format!(
            "{HEADER}{DUMMY_GAV}\n    <profiles>\n{}    </profiles>\n</project>\n",
            profile("profile-with-build", sections)
        )
    );
}

#[test]
fn nested_profiles_are_flattened() {
    let output = expand(&with_profiles(
        "    <profile>dummy-group:profile-with-nested:1.0</profile>\n",
    ));

    assert_eq!(
        output,
        format!(
            "{HEADER}{DUMMY_GAV}    <licenses>
{APACHE_LICENSE}    </licenses>

    <profiles>
        <profile>
            <id>dummy-group:profile-with-nested</id>
            <activation>
                <property>
                    <name>user.dir</name>
                </property>
            </activation>
            <properties>
                <dummy-group.profile-with-nested.version>1.0</dummy-group.profile-with-nested.version>
                <java.version>1.8</java.version>
            </properties>
        </profile>
{}    </profiles>
</project>
",
            profile("profile-with-license", "")
        )
    );
}

#[test]
fn scm_and_distribution_management_are_project_wide() {
    let repository = repository();
    let xml = with_profiles("    <profile>dummy-group:profile-with-scm:1.0</profile>\n");
    let doc = ProjectObjectModel::parse(&xml, &repository)
        .unwrap()
        .into_expanded()
        .unwrap();

    let root = doc.root();
    let top: Vec<&str> = doc.elements(root).filter_map(|id| doc.name(id)).collect();
    assert_eq!(
        top,
        [
            "modelVersion",
            "groupId",
            "artifactId",
            "version",
            "packaging",
            "scm",
            "distributionManagement",
            "profiles",
        ]
    );
    let profile = doc.element_at(root, "profiles/profile").unwrap();
    let sections: Vec<&str> = doc.elements(profile).filter_map(|id| doc.name(id)).collect();
    assert_eq!(sections, ["id", "activation", "properties"]);
}

#[test]
fn existing_profiles_are_kept() {
    let repository = repository();
    let xml = with_profiles(
        "    <profiles>
        <profile>
            <id>local</id>
        </profile>
    </profiles>
    <profile>dummy-group:profile-with-license:1.0</profile>
",
    );
    let doc = ProjectObjectModel::parse(&xml, &repository)
        .unwrap()
        .into_expanded()
        .unwrap();

    let ids: Vec<String> = doc
        .find("profiles/profile/id")
        .unwrap()
        .into_iter()
        .map(|id| doc.text(id))
        .collect();
    assert_eq!(ids, ["local", "dummy-group:profile-with-license"]);
    assert_eq!(doc.find("profiles").unwrap().len(), 1);
}

#[test]
fn profile_cycles_are_reported() {
    let err = expand_err(&with_profiles(
        "    <profile>dummy-group:cyclic-a:1.0</profile>\n",
    ));

    match err {
        Error::ProfileCycle(chain) => assert_eq!(
            chain,
            "dummy-group:cyclic-a:1.0 -> dummy-group:cyclic-b:1.0 -> dummy-group:cyclic-a:1.0"
        ),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unknown_profile_fails_resolution() {
    let err = expand_err(&with_profiles(
        "    <profile>dummy-group:no-such-profile:1.0</profile>\n",
    ));
    assert!(matches!(err, Error::Resolution(ResolveError::NotFound { .. })));
}

#[test]
fn broken_profile_document_is_a_parse_error() {
    let err = expand_err(&with_profiles(
        "    <profile>dummy-group:broken-profile:1.0</profile>\n",
    ));
    assert!(matches!(err, Error::Document(XmlError::Parse(_))));
}

#[test]
fn profile_reference_needs_version() {
    let err = expand_err(&with_profiles(
        "    <profile>dummy-group:profile-with-license</profile>\n",
    ));
    assert!(matches!(
        err,
        Error::MalformedCoordinate(CoordinateError::MissingVersion(_))
    ));
}

#[test]
fn single_pass_can_be_applied_alone() {
    let repository = repository();
    let mut doc = Document::parse(
        "<project><jar>g:a:1</jar><dependencies><test><jar>junit:junit:4.12</jar></test></dependencies></project>",
    )
    .unwrap();

    Pass::ExpandDependencies
        .apply(&mut PassContext::new(&mut doc, &repository))
        .unwrap();

    assert_eq!(doc.find("dependencies/dependency/scope").unwrap().len(), 1);
    assert_eq!(doc.find("jar").unwrap().len(), 1);
    assert!(doc.find("modelVersion").unwrap().is_empty());
}

#[test]
fn write_replaces_existing_file() {
    let repository = repository();
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("pom.xml");
    fs::write(&target, "stale content that is longer than nothing").unwrap();

    let mut pom =
        ProjectObjectModel::parse("<project><pom>g:parent:1</pom></project>", &repository).unwrap();
    pom.write_to(&target).unwrap();

    let written = fs::read_to_string(&target).unwrap();
    assert_eq!(written, pom.to_xml_string().unwrap());
    assert!(written.contains("<packaging>pom</packaging>"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn locator_converts_pomx() {
    let repository = repository();
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("pomx.xml"),
        "<project><jar>com.example:located:2.0</jar></project>",
    )
    .unwrap();

    let pom = locate_project(dir.path(), &repository).unwrap();

    assert_eq!(pom, dir.path().join("pom.xml"));
    let written = fs::read_to_string(&pom).unwrap();
    assert!(written.contains("<artifactId>located</artifactId>"));
    assert!(written.contains("pomx.xml -->"));
}

#[test]
fn locator_leaves_plain_projects_alone() {
    let repository = repository();
    let dir = tempfile::tempdir().unwrap();

    let pom = locate_project(dir.path(), &repository).unwrap();

    assert_eq!(pom, dir.path().join("pom.xml"));
    assert!(!pom.exists());
}
