//! IMS manifest templating for SCORM 1.2 packages.

/// Render the `imsmanifest.xml` document for a package whose resource files
/// are `index.html` and `content_file`. The manifest shape is fixed; only
/// the referenced content file varies between formats.
pub fn render(content_file: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<manifest xmlns="http://www.imsglobal.org/xsd/imscp_v1p1"
          xmlns:adlcp="http://www.adlnet.org/xsd/adlcp_v1p3"
          xsi:schemaLocation="http://www.imsglobal.org/xsd/imscp_v1p1">
    <metadata>
        <schema>ADL SCORM</schema>
        <schemaversion>1.2</schemaversion>
    </metadata>
    <organizations>
        <organization identifier="ORG-1">
            <title>PDF Analysis Response</title>
        </organization>
    </organizations>
    <resources>
        <resource identifier="RES-1" type="webcontent" href="index.html">
            <file href="index.html"/>
            <file href="{content_file}"/>
        </resource>
    </resources>
</manifest>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_references_content_file() {
        let xml = render("response.pdf");
        assert!(xml.contains(r#"<file href="index.html"/>"#));
        assert!(xml.contains(r#"<file href="response.pdf"/>"#));
        assert!(!xml.contains("response.docx"));
    }

    #[test]
    fn test_manifest_declares_scorm_12() {
        let xml = render("response.docx");
        assert!(xml.contains("<schema>ADL SCORM</schema>"));
        assert!(xml.contains("<schemaversion>1.2</schemaversion>"));
        assert!(xml.contains(r#"type="webcontent" href="index.html""#));
    }

    #[test]
    fn test_manifest_lists_exactly_two_files() {
        let xml = render("response.docx");
        assert_eq!(xml.matches("<file href=").count(), 2);
    }
}
