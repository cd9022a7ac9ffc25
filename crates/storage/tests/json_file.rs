use quiz_core::{Category, DEFAULT_QUIZ_TITLE, Question, Quiz};
use storage::json::JsonFileRepository;
use storage::repository::{QuizRepository, Storage};

fn temp_file() -> std::path::PathBuf {
    std::env::temp_dir()
        .join(format!("quiz-store-{}", uuid::Uuid::new_v4()))
        .join("Quizzes.json")
}

#[tokio::test]
async fn json_roundtrip_through_storage() {
    let path = temp_file();
    let storage = Storage::json_file(&path);

    let quiz = Quiz::with_questions(
        "Capitals",
        vec![
            Question::new(
                "Capital of France?",
                ["Paris".into(), "Lyon".into(), "Nice".into()],
                0,
                "",
                Category::Geography,
            )
            .unwrap(),
        ],
    );
    let quizzes = vec![Quiz::default_quiz(), quiz];
    storage.quizzes.save_quizzes(&quizzes).await.unwrap();

    let loaded = storage.quizzes.load_quizzes().await.unwrap();
    assert_eq!(loaded, quizzes);
    assert!(!path.with_file_name("Quizzes.json.tmp").exists());
}

#[tokio::test]
async fn json_reads_legacy_files() {
    let path = temp_file();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let legacy = format!(
        r#"[
  {{
    "Title": "{DEFAULT_QUIZ_TITLE}",
    "Questions": [
      {{
        "Statement": "Which planet is red?",
        "Answers": ["Venus", "Mars", "Jupiter"],
        "CorrectAnswerIndex": 1,
        "ImagePath": "Images/mars.jpg",
        "Category": 4
      }}
    ]
  }},
  {{
    "Title": "Custom",
    "Questions": [
      {{
        "Statement": "2 + 2?",
        "Answers": ["3", "4", "5"],
        "CorrectAnswerIndex": 1,
        "Category": "Math"
      }}
    ]
  }}
]"#
    );
    std::fs::write(&path, legacy).unwrap();

    let loaded = JsonFileRepository::new(&path).load_quizzes().await.unwrap();
    assert_eq!(loaded.len(), 2);
    assert!(loaded[0].is_default());
    assert!(!loaded[1].is_default());
    assert_eq!(loaded[0].questions()[0].category(), Category::Science);
    assert_eq!(loaded[0].questions()[0].correct_answer(), "Mars");
    assert_eq!(loaded[1].questions()[0].category(), Category::Math);
    assert_eq!(loaded[1].questions()[0].image_path(), "");
}

#[tokio::test]
async fn json_invalid_question_fails_whole_load() {
    let path = temp_file();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(
        &path,
        r#"[{"Title": "Broken", "Questions": [
            {"Statement": "Q", "Answers": ["a", "b", "c"], "CorrectAnswerIndex": 7, "Category": 0}
        ]}]"#,
    )
    .unwrap();

    assert!(JsonFileRepository::new(&path).load_quizzes().await.is_err());
}
