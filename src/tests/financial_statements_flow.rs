// End-to-end financial statements flow: multipart response decoding behind
// the authorized registry call.

#[cfg(test)]
mod tests {

    use axum::routing::{get, post};
    use axum::Json;
    use httpmock::Method::{GET, POST};
    use httpmock::MockServer;

    use crate::error::{DecodeError, RegistryRequestError, VirreError};
    use crate::models::Register;
    use crate::tests::common::*;

    const PDF: &[u8] = b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\r\n1 0 obj\n<<>>\nendobj\n";

    async fn mock_auth(server: &MockServer) {
        server
            .mock_async(|when, then| {
                when.method(POST).path("/oxauth/restv1/token");
                then.status(200).json_body(token_response("abc", 3600));
            })
            .await;
    }

    #[tokio::test]
    async fn decodes_metadata_and_attachment() {
        let server = MockServer::start_async().await;
        mock_auth(&server).await;
        let body = multipart_body("XYZ", &statements_metadata(), &[("file1", "report.pdf", "application/pdf", PDF)]);
        let statements_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/ttfs/1.0.0/financialStatements")
                    .header("authorization", "Bearer abc")
                    .query_param("businessId", BUSINESS_ID)
                    .query_param("register", "krek")
                    .query_param("periodStartDate", "2020-01-01")
                    .query_param("periodEndDate", "2020-12-31");
                then.status(200)
                    .header("content-type", "multipart/form-data; boundary=XYZ")
                    .body(body);
            })
            .await;

        let client = build_client(&server.base_url());
        let statements = client
            .get_financial_statements(BUSINESS_ID, Register::Krek, "2020-01-01", "2020-12-31")
            .await
            .unwrap();

        statements_mock.assert_async().await;
        assert_eq!(statements.metadata.business_id, BUSINESS_ID);
        assert_eq!(statements.metadata.register, Register::Krek);
        assert_eq!(statements.metadata.company_name, "Acme");
        assert_eq!(statements.metadata.period.start_date, "2020-01-01");
        assert_eq!(statements.metadata.period.end_date, "2020-12-31");
        assert!(statements.metadata.documents.is_empty());

        assert_eq!(statements.attachments.len(), 1);
        let attachment = &statements.attachments[0];
        assert_eq!(attachment.filename, "report.pdf");
        assert_eq!(attachment.mime_type, "application/pdf");
        assert_eq!(attachment.name, "file1");
        assert_eq!(attachment.data, PDF);
        assert_eq!(client.metrics().attachments_decoded.get(), 1);
    }

    #[tokio::test]
    async fn attachments_keep_response_order() {
        let server = MockServer::start_async().await;
        mock_auth(&server).await;
        let attachments: [(&str, &str, &str, &[u8]); 3] = [
            ("file1", "income.pdf", "application/pdf", PDF),
            ("file2", "balance.xhtml", "application/xhtml+xml", b"<html/>"),
            ("file3", "notes.txt", "text/plain", b""),
        ];
        let body = multipart_body("----virre", &statements_metadata(), &attachments);
        server
            .mock_async(|when, then| {
                when.method(GET).path("/ttfs/1.0.0/financialStatements");
                then.status(200)
                    .header("content-type", "multipart/form-data; boundary=\"----virre\"")
                    .body(body);
            })
            .await;

        let client = build_client(&server.base_url());
        let statements = client
            .get_financial_statements(BUSINESS_ID, Register::Krek, "2020-01-01", "2020-12-31")
            .await
            .unwrap();

        assert_eq!(statements.attachments.len(), attachments.len());
        for (got, (name, filename, mime_type, data)) in statements.attachments.iter().zip(attachments.iter()) {
            assert_eq!(got.name, *name);
            assert_eq!(got.filename, *filename);
            assert_eq!(got.mime_type, *mime_type);
            assert_eq!(got.data, *data);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn missing_content_type_is_decode_error() {
        let body = multipart_body("XYZ", &statements_metadata(), &[]);
        let router = Router::new()
            .route("/oxauth/restv1/token", post(|| async { Json(token_response("abc", 3600)) }))
            .route(
                "/ttfs/1.0.0/financialStatements",
                // a bare Body carries no content-type
                get(move || {
                    let body = body.clone();
                    async move { Body::from(body) }
                }),
            );
        let (_handle, addr) = spawn_axum(router).await;

        let client = build_client(&format!("http://{}", addr));
        let err = client
            .get_financial_statements(BUSINESS_ID, Register::Krek, "2020-01-01", "2020-12-31")
            .await
            .unwrap_err();

        assert!(matches!(err, VirreError::Decode(DecodeError::MissingContentType)));
        assert_eq!(
            client.metrics().decode_failures.with_label_values(&["missing_content_type"]).get(),
            1
        );
    }

    #[tokio::test]
    async fn attachment_without_filename_fails_atomically() {
        let server = MockServer::start_async().await;
        mock_auth(&server).await;
        let mut body = multipart_body("XYZ", &statements_metadata(), &[("file1", "report.pdf", "application/pdf", PDF)]);
        body.truncate(body.len() - "--XYZ--\r\n".len());
        body.extend_from_slice(
            b"--XYZ\r\nContent-Disposition: form-data; name=\"file2\"\r\nContent-Type: application/pdf\r\n\r\nxx\r\n--XYZ--\r\n",
        );
        server
            .mock_async(|when, then| {
                when.method(GET).path("/ttfs/1.0.0/financialStatements");
                then.status(200)
                    .header("content-type", "multipart/form-data; boundary=XYZ")
                    .body(body);
            })
            .await;

        let client = build_client(&server.base_url());
        let err = client
            .get_financial_statements(BUSINESS_ID, Register::Krek, "2020-01-01", "2020-12-31")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            VirreError::Decode(DecodeError::InvalidAttachment { index: 1, missing: "filename" })
        ));
        assert_eq!(client.metrics().attachments_decoded.get(), 0);
    }

    #[tokio::test]
    async fn server_error_text_body_is_serialized() {
        let server = MockServer::start_async().await;
        mock_auth(&server).await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/ttfs/1.0.0/financialStatements");
                then.status(500).body("upstream unavailable");
            })
            .await;

        let client = build_client(&server.base_url());
        let err = client
            .get_financial_statements(BUSINESS_ID, Register::Krek, "2020-01-01", "2020-12-31")
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "An error occurred while fetching financial statements: \"upstream unavailable\""
        );
        assert!(matches!(err, VirreError::Registry(RegistryRequestError::Status { .. })));
    }
}
