// Resume structuring prompt templates.
// All prompts for the parser module are defined here.

pub const RESUME_PARSE_PROMPT: &str = r#"Parse the following resume text and extract the relevant information as a JSON object with these keys:

- "Name": Full name of the individual.
- "Skills": A list of skills or expertise mentioned.
- "Education": A list of educational qualifications (degree, institution, graduation year).
- "Projects": A list of projects (title, description, technologies used, duration).
- "Experience": A list of work experiences (job title, company, duration, responsibilities).

Ensure the output is in valid JSON format. If a section is not found, return an empty list for that key.

Resume Text:
{resume_text}

Return only the JSON object, nothing else:"#;
