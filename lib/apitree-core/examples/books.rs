use apitree_core::{DocumentAssembler, FlatModel, ModelDefinition, PathDefinition};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().pretty().init();

    // Declare the API tree
    let api = PathDefinition::define("/api/v1/book", "Book", |p| {
        p.package("me.books");

        let author = p.model("Author", |m| {
            m.id();
            m.string("name").remark("Name");
        })?;
        let book = p.entity("Book", |m| {
            m.id();
            m.string("isbn").remark("ISBN").required();
            m.string("name").remark("Title").required().length(1..=10);
            m.date("publishDate").remark("Publish date");
            m.obj("author", &author).remark("Author");
        })?;
        let by_id = ModelDefinition::dynamic(|m| {
            m.id();
        })?;

        p.get("", |op| {
            op.description("Book detail").req(&by_id).wrapped_resp(&book);
        })
        .get("/s", |op| {
            op.description("Book search")
                .page_req(&by_id)
                .page_resp(&book);
        })
        .post("", |op| {
            op.description("Save").req_body(&book).wrapped_resp(&by_id);
        })
        .put("/disable", |op| {
            op.description("Disable books")
                .req_body(&by_id)
                .wrapped_resp(&FlatModel::int_list());
        });
        Ok(())
    })?;

    // Assemble and print the document
    let document = DocumentAssembler::builder()
        .with_info_simple("Library", "1.0.0")
        .with_description("Books and authors")
        .build()
        .assemble(&[api])?;
    let out = serde_json::to_string_pretty(&document)?;
    println!("{out}");

    Ok(())
}
