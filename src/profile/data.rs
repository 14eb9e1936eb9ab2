//! The profile shipped with the assistant

use super::{ContactInfo, Education, Experience, Profile, Project, SkillGroup};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn skills(category: &str, items: &[&str]) -> SkillGroup {
    SkillGroup {
        category: category.to_string(),
        skills: strings(items),
    }
}

pub(super) fn builtin_profile() -> Profile {
    Profile {
        contact: ContactInfo {
            name: "Anshul Parate".to_string(),
            role: "Generative AI Developer".to_string(),
            email: "anshulnparate@gmail.com".to_string(),
            phone: "+91 8208170566".to_string(),
            portfolio: "https://anshul-dev-profolio.vercel.app/".to_string(),
            github: "https://github.com/AnshulParate2004".to_string(),
            linkedin: "https://linkedin.com/in/anshulparate".to_string(),
        },
        summary: "Full-Stack Generative AI Developer with deep expertise in RAG systems, LLMs, \
LangGraph, LangChain, Transformers, and advanced document understanding. Experienced in \
building production-grade pipelines with 94% semantic relevance, 35% faster inference on 1K+ \
daily queries, and 89% rockfall detection accuracy. Skilled across Computer Vision, MLOps, \
Prompt Engineering, and backend/frontend systems. Proven track record in delivering scalable \
GenAI solutions, leading technical teams, and driving measurable impact."
            .to_string(),
        education: vec![
            Education {
                degree: "B.Tech CSE (AIML)".to_string(),
                institution: "Shri Ramdeobaba College of Engineering & Management".to_string(),
                score: "CGPA: 7.89".to_string(),
                period: "2023—Present".to_string(),
            },
            Education {
                degree: "HSC (12th)".to_string(),
                institution: "Prerna International School, Vihirgaon".to_string(),
                score: "Percentage: 77.8%".to_string(),
                period: "2022".to_string(),
            },
            Education {
                degree: "SSC (10th)".to_string(),
                institution: "Sanskar Vidya Sagar, Nagpur".to_string(),
                score: "Percentage: 80.2%".to_string(),
                period: "2020".to_string(),
            },
        ],
        technical_skills: vec![
            skills(
                "Generative AI",
                &[
                    "Transformers",
                    "LangGraph",
                    "LangChain",
                    "Qdrant",
                    "Chroma",
                    "Neo4j",
                    "Unstructured.io",
                    "Vertex AI",
                ],
            ),
            skills(
                "Machine Learning",
                &["PyTorch", "TensorFlow", "Computer Vision", "Scikit-learn"],
            ),
            skills(
                "Backend Development",
                &[
                    "FastAPI",
                    "Django REST Framework",
                    "PostgreSQL",
                    "MongoDB",
                    "JWT/Auth Systems",
                ],
            ),
            skills(
                "Frontend Development",
                &[
                    "React.js",
                    "UI/UX",
                    "State Management",
                    "Responsive Design",
                    "TailwindCSS",
                    "Figma",
                ],
            ),
            skills(
                "Cloud & DevOps",
                &[
                    "Docker",
                    "Railway",
                    "Render",
                    "Git/GitHub",
                    "CI/CD",
                    "Model Deployment",
                ],
            ),
            skills(
                "Core Competencies",
                &[
                    "Prompt Engineering",
                    "R&D",
                    "Workflow Automation",
                    "Leadership",
                    "Problem Solving",
                ],
            ),
        ],
        projects: vec![
            Project {
                name: "Multi-Modular RAG System".to_string(),
                description:
                    "Solves AI gap in image/table extraction; supports 98 languages, 18 file formats"
                        .to_string(),
                highlights: strings(&[
                    "Built an LLM-driven chatbot using LangGraph, improving engagement by 40% over baseline bots",
                    "Designed RAG pipelines using Unstructured.io achieving 92% accurate extraction across 1,000+ documents",
                    "Retrieved real images + tables from PDFs, scans, docs, and 18+ formats with 94% precision",
                ]),
                technologies: strings(&[
                    "React",
                    "FastAPI",
                    "Qdrant",
                    "Chroma",
                    "PostgreSQL",
                    "Unstructured.io",
                    "Python",
                ]),
                demo_video: "https://www.youtube.com/watch?v=a9Haiu-e7ZU".to_string(),
                github: "https://github.com/AnshulParate2004/ChunkSmith".to_string(),
                website: "https://multi-modul-rag.vercel.app/".to_string(),
            },
            Project {
                name: "Rockfall Detection System for Open-Pit Mines".to_string(),
                description: "SIH Round-1 Qualified Project".to_string(),
                highlights: strings(&[
                    "LiDAR drone mesh modeling identified 8–10% critical zones from full mine coverage",
                    "PINN + YOLOv8 system achieved 89% accurate rockfall prediction using multi-sensor inputs",
                    "FastAPI + OpenCV backend powering a React geo-dashboard with mobile alerts for 200 workers",
                ]),
                technologies: strings(&[
                    "Python", "YOLOv8", "PyTorch", "OpenCV", "FastAPI", "React", "LiDAR", "PINN",
                ]),
                demo_video: "https://www.youtube.com/watch?v=0eWDi7hRyVU".to_string(),
                github: "https://github.com/AnshulParate2004/GeoSentinel".to_string(),
                website: "https://sih-nu-liart.vercel.app/".to_string(),
            },
            Project {
                name: "AI Chatbot with LangGraph & Semantic Storage".to_string(),
                description: "Agentic conversational flows with semantic memory".to_string(),
                highlights: strings(&[
                    "Built agentic conversational flows using LangGraph + FastAPI with Qdrant/Chroma",
                    "Achieved 95% contextual memory retention with adaptive response generation",
                    "Boosted user engagement by 40% through semantic pipelines",
                ]),
                technologies: strings(&["LangGraph", "FastAPI", "Qdrant", "Chroma", "Python"]),
                demo_video: String::new(),
                github: String::new(),
                website: String::new(),
            },
        ],
        experience: vec![Experience {
            title: "Graphic Designer Lead".to_string(),
            organization: "Technical Club, RBU – Nagpur".to_string(),
            period: "2023–Present".to_string(),
            responsibilities: strings(&[
                "Led a team of 6 developers/designers to build 5+ production-ready websites",
                "Designed complete UI/UX systems and 18 social media post sets for brand identity",
                "Managed Instagram growth achieving 150% engagement increase",
                "Organized 8+ technical events/workshops with 200+ participants",
            ]),
        }],
        achievements: strings(&[
            "Smart India Hackathon – Round 1 Qualifier",
            "Developed a high-accuracy image/table extraction system reducing data prep time by 60%",
            "Led a 6-member design team to increase Instagram engagement by 150%",
            "1st Place – School Drawing Competition",
        ]),
    }
}
